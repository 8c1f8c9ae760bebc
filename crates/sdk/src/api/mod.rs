//! API endpoint implementations.

mod calendars;
mod index;
mod links;
mod manuscripts;
mod names;
mod search;
mod shape;
mod texts;
mod topics;

pub use calendars::CalendarsApi;
pub use index::IndexApi;
pub use links::{LinksApi, LinkText};
pub use manuscripts::ManuscriptsApi;
pub use names::{NameQuery, NamesApi};
pub use search::SearchApi;
pub use shape::ShapeApi;
pub use texts::TextsApi;
pub use topics::{TopicOptions, TopicsApi};
