// Interface adapters: HTTP contract, handlers and in-memory storage.

pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod security;
pub mod state;
