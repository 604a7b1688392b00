pub mod default_users;
