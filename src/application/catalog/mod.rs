pub mod conversion_factor;
pub mod item_details;
pub mod items_overview;

pub use conversion_factor::{ConversionFactorCommand, ConversionFactorUseCase};
pub use item_details::{ItemDetailsCommand, ItemDetailsUseCase};
pub use items_overview::{ItemsOverviewCommand, ItemsOverviewResponse, ItemsOverviewUseCase};
