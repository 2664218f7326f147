//! # village-map
//!
//! Carte choroplèthe des villages (里) de Nouveau Taipei, colorés par zone
//! administrative de district.
//!
//! ## Features
//!
//! - Classification district → zone (一區 / 二區 / 三區) et légende
//! - Fusion des villages en contours de districts, avec repli legacy puis
//!   dégradation sans contours
//! - Survol et sélection pilotés par une machine à états indépendante du
//!   moteur de rendu ([`MapEngine`])
//! - Route de la page détail `/village/{id}`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use village_map::{MapView, PointerEvent, PointerEventKind, ViewOptions};
//!
//! let mut view = MapView::new(engine, ViewOptions::default())?;
//! let report = view.load(&asset_text)?;
//! println!("{}", report.summary());
//!
//! if view.handle(&event) {
//!     if let Some(selection) = view.selection() {
//!         println!("{} {} → {}", selection.district, selection.village, selection.detail_href());
//!     }
//! }
//! ```

pub mod asset;
pub mod classify;
pub mod clock;
pub mod dissolve;
pub mod error;
pub mod report;
pub mod route;
pub mod state;
pub mod types;
pub mod view;
pub mod zone;

pub use classify::{classify, classify_str, Classification};
pub use error::VillageMapError;
pub use report::{ClassificationReport, ClassificationStatus};
pub use state::{HoverState, Selection};
pub use types::{DistrictOutline, VillageFeature, VillageProps};
pub use view::{MapEngine, MapView, PointerEvent, PointerEventKind, ViewOptions};
pub use zone::{classify_district, legend, LegendEntry, Zone};
