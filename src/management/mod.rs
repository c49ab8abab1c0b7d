mod user;

pub use user::MemoryUserStore;
pub use user::PgUserStore;
pub use user::UserStore;
