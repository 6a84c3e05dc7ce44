pub mod company_currency;
pub mod default_company;
pub mod default_country;
pub mod exchange_rate;
pub mod tax_templates;

pub use company_currency::{CompanyCurrencyResponse, CompanyCurrencyUseCase};
pub use default_company::{DefaultCompanyResponse, DefaultCompanyUseCase};
pub use default_country::{DefaultCountryResponse, DefaultCountryUseCase};
pub use exchange_rate::{ExchangeRateCommand, ExchangeRateResponse, ExchangeRateUseCase};
pub use tax_templates::{TaxTemplatesResponse, TaxTemplatesUseCase};
