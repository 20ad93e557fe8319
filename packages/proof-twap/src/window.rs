use cosmwasm_schema::cw_serde;

use crate::error::TwapError;

/// Range of block distances, relative to a reference block, a proof may attest to.
///
/// Both bounds are inclusive. Keeping them below 256 matches how far back a
/// block hash can be looked up by the source chain.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct FreshnessWindow {
    pub min_blocks_back: u8,
    pub max_blocks_back: u8,
}

impl FreshnessWindow {
    pub fn new(min_blocks_back: u8, max_blocks_back: u8) -> Result<Self, TwapError> {
        let window = Self {
            min_blocks_back,
            max_blocks_back,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), TwapError> {
        if self.min_blocks_back == 0 || self.min_blocks_back > self.max_blocks_back {
            return Err(TwapError::InvalidWindow {
                min: self.min_blocks_back,
                max: self.max_blocks_back,
            });
        }
        Ok(())
    }

    /// Checks that `block_number` lies in
    /// `[reference_block - max_blocks_back, reference_block - min_blocks_back]`.
    pub fn check(&self, block_number: u64, reference_block: u64) -> Result<(), TwapError> {
        let newest = reference_block.checked_sub(self.min_blocks_back.into());
        match newest {
            Some(max_allowed) if block_number <= max_allowed => {}
            _ => {
                return Err(TwapError::BlockTooRecent {
                    block_number,
                    reference_block,
                    max_allowed: newest.unwrap_or_default(),
                })
            }
        }

        let min_allowed = reference_block.saturating_sub(self.max_blocks_back.into());
        if block_number < min_allowed {
            return Err(TwapError::BlockTooOld {
                block_number,
                reference_block,
                min_allowed,
            });
        }
        Ok(())
    }
}
