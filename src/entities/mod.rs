// ABOUTME: SeaORM entities module for the marketplace account models
// ABOUTME: Exports users, role profiles, social links and packages

pub mod customer_profile;
pub mod host_profile;
pub mod package;
pub mod user;
pub mod user_profile_links;

pub use customer_profile::Entity as CustomerProfile;
pub use host_profile::Entity as HostProfile;
pub use package::Entity as Package;
pub use user::Entity as User;
pub use user_profile_links::Entity as UserProfileLinks;
