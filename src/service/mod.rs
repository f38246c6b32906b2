//! Entity services: validated input in, statements through the executor, typed rows out.

mod articles;
mod comments;
mod topics;
mod users;
mod validation;
pub use articles::ArticleService;
pub use comments::CommentService;
pub use topics::TopicService;
pub use users::UserService;
pub use validation::RequestValidator;
