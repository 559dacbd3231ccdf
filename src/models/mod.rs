pub mod question;
pub mod response;
pub mod test_session;
