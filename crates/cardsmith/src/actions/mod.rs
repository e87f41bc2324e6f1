//! Action groups exposed by [`ChatClient`](crate::ChatClient).

mod chat;

pub use chat::ChatActions;
