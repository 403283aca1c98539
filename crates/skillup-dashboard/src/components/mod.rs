//! Text components shared by the screens

pub mod banner;
pub mod loading;
pub mod pagination;
pub mod table;

pub use banner::{Banner, BannerAction};
pub use loading::Loading;
pub use pagination::Pagination;
pub use table::Table;
