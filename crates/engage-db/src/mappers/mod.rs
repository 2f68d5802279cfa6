//! Entity <-> model mappers

mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod share;
mod user;
