//! Platform entity types
//!
//! Wire shapes for the REST API v2. All members are optional because the
//! platform omits unset fields and partial bodies are legal on update.

pub mod campaign;
pub mod common;
pub mod contact_list;
pub mod location;
pub mod number_plan;
pub mod outbound_route;
pub mod site;

pub use campaign::{
    Campaign, CampaignPhoneColumn, CampaignStatus, ContactSort, DialingMode,
    DynamicContactQueueingSettings,
};
pub use common::{is_soft_deleted, DomainEntityRef, EntityListing, EntityState};
pub use contact_list::{ContactList, ContactPhoneColumn};
pub use location::{EmergencyNumber, Location, MediaRegions};
pub use number_plan::{DigitLength, NumberPlan, NumberRange};
pub use outbound_route::{OutboundRoute, RouteDistribution};
pub use site::Site;
