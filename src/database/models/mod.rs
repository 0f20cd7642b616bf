pub mod phone_number_type;
pub mod user;

pub use phone_number_type::{PhoneNumberType, PhoneNumberTypeColumn, PhoneNumberTypeInput};
pub use user::UserAccount;
