pub mod activity_logs;
pub mod game_list_entries;
pub mod games;
pub mod reviews;
pub mod users;

pub use activity_logs::Entity as ActivityLogs;
pub use activity_logs::Model as ActivityLog;
pub use game_list_entries::Entity as GameListEntries;
pub use game_list_entries::Model as GameListEntry;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use reviews::Entity as Reviews;
pub use reviews::Model as Review;
pub use users::Entity as Users;
pub use users::Model as User;
