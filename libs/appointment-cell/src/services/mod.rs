pub mod booking;
pub mod store;
pub mod supabase_store;

pub use booking::AppointmentBookingService;
pub use store::{AppointmentStore, InMemoryAppointmentStore};
pub use supabase_store::SupabaseAppointmentStore;
