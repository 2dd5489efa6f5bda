pub use super::document::Entity as Document;
pub use super::emergency_contact::Entity as EmergencyContact;
pub use super::employee::Entity as Employee;
pub use super::induction::Entity as Induction;
pub use super::license::Entity as License;
