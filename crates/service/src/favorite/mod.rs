pub mod input;
pub mod memory;
pub mod mongo;
pub mod repository;
pub mod service;

pub use input::FavoriteInput;
pub use memory::InMemoryFavoriteRepository;
pub use mongo::MongoFavoriteRepository;
pub use repository::FavoriteRepository;
pub use service::FavoriteService;
