pub mod classify;
pub mod endpoints;
pub mod error;
pub mod feed;
pub mod od;
pub mod output;
