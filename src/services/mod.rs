pub mod question_catalog;
pub mod response_service;
pub mod review_service;
pub mod session_service;
