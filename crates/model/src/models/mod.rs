mod credits;
mod filter;
mod image;
mod kind;
mod movie;
mod series;
mod watchlist;

pub use self::credits::{CastMember, CreditList};
pub use self::filter::{DiscoverFilter, FilterKey};
pub use self::image::{ImageRole, ImageSize};
pub use self::kind::ContentKind;
pub use self::movie::Movie;
pub use self::series::{Episode, TvSeries};
pub use self::watchlist::WatchlistEntry;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('/', "").replace('-', "").replace('_', "").replace(' ', "")
}
