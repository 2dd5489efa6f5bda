pub mod document;
pub mod emergency_contact;
pub mod employee;
pub mod induction;
pub mod license;

pub use document::Entity as Document;
pub use emergency_contact::Entity as EmergencyContact;
pub use employee::Entity as Employee;
pub use induction::Entity as Induction;
pub use license::Entity as License;

pub mod prelude;
