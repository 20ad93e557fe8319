pub mod builder;
pub mod mock_pair;
pub mod mock_registry;
pub mod mock_verifier;
