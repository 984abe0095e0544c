pub mod provisioner;
pub use provisioner::{NewUser, ProvisionError, UserProvisioner, ValidatedUser};

pub mod provisioner_impl;
pub use provisioner_impl::SeaOrmUserProvisioner;
