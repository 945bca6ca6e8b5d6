//! Web scraping tools backed by the scraper services.

mod linkedin;
mod siret;
mod whois;

pub use linkedin::{
    LinkedinCompanyParams, LinkedinCompanyResult, LinkedinCompanyTool, LinkedinProfileParams,
    LinkedinProfileResult, LinkedinProfileTool,
};
pub use siret::{SiretExtractorParams, SiretExtractorResult, SiretExtractorTool};
pub use whois::{RdapWhoisParams, RdapWhoisResult, RdapWhoisTool};
