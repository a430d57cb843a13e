//! Wire types shared between the article service and its clients.

pub mod model;
pub mod requests;
pub mod responses;
