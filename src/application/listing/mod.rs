pub mod list_names;
pub mod modes_of_payment;

pub use list_names::{ListNamesCommand, ListNamesResponse, ListNamesUseCase, NameRow};
pub use modes_of_payment::{ModesOfPaymentCommand, ModesOfPaymentResponse, ModesOfPaymentUseCase};
