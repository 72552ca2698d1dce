pub mod memory;
pub mod order;
pub mod product;
pub mod user;

pub use memory::InMemoryOrderRepository;
pub use memory::InMemoryProductRepository;
pub use memory::InMemoryUserRepository;
pub use order::PostgresOrderRepository;
pub use product::PostgresProductRepository;
pub use user::PostgresUserRepository;
