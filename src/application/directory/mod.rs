pub mod all_customers;
pub mod create_customer;
pub mod get_user;
pub mod party_account;
pub mod party_details;

pub use all_customers::{AllCustomersResponse, AllCustomersUseCase};
pub use create_customer::{CreateCustomerCommand, CreateCustomerResponse, CreateCustomerUseCase};
pub use get_user::{GetUserCommand, GetUserResponse, GetUserUseCase};
pub use party_account::{PartyAccountCommand, PartyAccountUseCase};
pub use party_details::{PartyDetailsCommand, PartyDetailsUseCase};
