//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod custom_question_repo;
pub mod event_repo;
pub mod guest_repo;
pub mod media_repo;
pub mod organizer_repo;
pub mod section_repo;

pub use custom_question_repo::CustomQuestionRepo;
pub use event_repo::EventRepo;
pub use guest_repo::GuestRepo;
pub use media_repo::MediaRepo;
pub use organizer_repo::OrganizerRepo;
pub use section_repo::SectionRepo;
