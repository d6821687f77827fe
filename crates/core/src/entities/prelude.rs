pub use super::connections::Entity as Connections;
pub use super::events::Entity as Events;
pub use super::files::Entity as Files;
pub use super::messages::Entity as Messages;
pub use super::progress::Entity as Progress;
pub use super::tasks::Entity as Tasks;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
