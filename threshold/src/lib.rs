pub mod aggregate;
pub mod crp;
pub mod errors;
pub mod galois;
pub mod keys;
pub mod keyswitch;
pub mod parameters;
pub mod protocol;
pub mod scratch;
pub mod store;

pub use crate::crp::Crp;
pub use crate::errors::Error;
pub use crate::galois::{Direction, GALOIS_GENERATOR, GaloisIndexTable, Rotation};
pub use crate::keys::{AggregatedKey, PublicShare, RotationKeySet, SecretKeyShare};
pub use crate::parameters::{Parameters, ParametersLiteral};
pub use crate::protocol::RotationKeyGenerator;
pub use crate::scratch::{Scratch, ScratchGuard, ScratchPool};
