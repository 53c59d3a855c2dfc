// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Statistics Module
//!
//! Location inference, activity classification and aggregation over a
//! static activity collection.
//!
//! Data flows one way: each activity's location text is resolved by the
//! [`LocationResolver`], the [`TypeClassifier`] turns type, subtype and
//! distance into a period key and title, the period tables count those
//! titles, and [`aggregate`] folds everything into one [`StatsResult`].
//! Country names are normalized inline while collecting countries.
//!
//! Everything here is infallible: missing or malformed fields degrade to
//! empty strings and zeros.

pub mod aggregator;
pub mod cities;
pub mod classifier;
pub mod country;
pub mod filters;
pub mod location;
pub mod matchers;
pub mod path;
pub mod period;
pub mod tally;

pub use aggregator::{aggregate, StatsEngine, StatsResult, StatsSummary};
pub use classifier::{classify, PeriodKey, TypeClassifier};
pub use country::normalize_country;
pub use filters::{filter_and_sort, DateOrder, FilterKind};
pub use location::{parse_location, LocationResolver};
pub use period::{build_run_period, build_run_period_no_city, sort_run_period};
pub use tally::{CityDistances, PeriodCounts, Tally};
