//! Route table of the `bookapi` resource, shared by the service and the client.
//!
//! Paths are relative to `<base>/bookapi`; `{id}` segments are filled by the caller.

pub const BOOK_API_SEGMENT: &str = "bookapi";

pub const LIST_SEGMENT: &str = "all";
pub const ADD_SEGMENT: &str = "add";
pub const UPDATE_SEGMENT: &str = "update";
pub const DELETE_SEGMENT: &str = "delete";

pub fn list_route() -> &'static str {
    "/bookapi/all"
}

pub fn add_route() -> &'static str {
    "/bookapi/add"
}

/// Axum-style route templates for the id-keyed operations.
pub fn get_route_template() -> &'static str {
    "/bookapi/:id"
}

pub fn update_route_template() -> &'static str {
    "/bookapi/update/:id"
}

pub fn delete_route_template() -> &'static str {
    "/bookapi/delete/:id"
}

pub fn delete_ack(id: &str) -> String {
    format!("Book deleted with id {id}")
}
