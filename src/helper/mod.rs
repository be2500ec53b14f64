//! Generic adapters that build filesystems out of other filesystems.
//!
//! - [`ChrootFs`] confines any cloneable filesystem to a sub-directory
//! - [`Polyfill`] completes a [`Basic`](crate::Basic)-only implementation

mod chroot;
mod polyfill;

pub use chroot::ChrootFs;
pub use polyfill::Polyfill;
