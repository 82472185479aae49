//! Password hashing module

mod hasher;

pub use hasher::{BcryptPasswordHasher, PasswordHasher, DEFAULT_BCRYPT_COST};
