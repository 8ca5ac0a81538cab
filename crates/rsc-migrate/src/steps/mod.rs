//! One pure function per adjacent version pair.
//!
//! Steps take a record of one shape and return the next shape together with
//! a [`StepReport`](crate::status::StepReport). They never look at the target
//! version; sequencing is the driver's job.

mod v3_2_to_v3_3;
mod v3_3_to_v4_0;
mod v4_0_to_v4_1;
mod v4_1_to_v4_2;

pub use v3_2_to_v3_3::migrate_v3_2_to_v3_3;
pub use v3_3_to_v4_0::{migrate_v3_3_to_v4_0, remap_vulnerability};
pub use v4_0_to_v4_1::{migrate_v4_0_to_v4_1, rescale_consequence, rescale_probability};
pub use v4_1_to_v4_2::migrate_v4_1_to_v4_2;
