mod projects;
mod segments;
mod users;

pub use projects::ProjectRepository;
pub use segments::SegmentRepository;
pub use users::UserRepository;
