mod chat_layout;
mod home;
mod login;
mod navbar;
mod playlist_modal;
mod signup;

pub use chat_layout::ChatLayout;
pub use home::HomePage;
pub use login::Login;
pub use navbar::Navbar;
pub use playlist_modal::PlaylistModal;
pub use signup::Signup;
