mod layout;
pub use layout::AppLayout;

mod require_auth;
pub use require_auth::RequireAuth;

mod home;
pub use home::Home;

mod about;
pub use about::About;

mod loading_debug;
pub use loading_debug::LoadingDebug;

mod profile;
pub use profile::Profile;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod not_found;
pub use not_found::NotFound;
