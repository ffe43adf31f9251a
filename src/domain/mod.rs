mod phone_number;
mod recipient_email;
mod sms_text;
mod template_name;

pub use phone_number::PhoneNumber;
pub use recipient_email::RecipientEmail;
pub use sms_text::SmsText;
pub use template_name::TemplateName;
