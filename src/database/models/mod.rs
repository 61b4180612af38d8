pub mod artist;
pub mod category;
pub mod drink;
pub mod question;
pub mod show;
pub mod venue;

pub use artist::Artist;
pub use category::Category;
pub use drink::Drink;
pub use question::Question;
pub use show::{Show, ShowListing, ShowWithArtist, ShowWithVenue};
pub use venue::Venue;
