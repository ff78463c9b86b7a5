pub mod blog_repo;
pub mod listing_repo;

pub use blog_repo::BlogRepo;
pub use listing_repo::ListingRepo;
