//! Request extractors.

mod current_user;
