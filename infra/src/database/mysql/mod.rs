//! MySQL repository implementations

pub mod user_repository_impl;
pub mod verification_code_repository_impl;

pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;
