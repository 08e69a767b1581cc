pub mod interface;
pub mod google;

pub use interface::{ProviderError, Translation, TranslationProvider};
pub use google::GoogleTranslateClient;
