use async_trait::async_trait;

use crate::modules::payment::application::domain::catalog::CreditPackage;

#[async_trait]
pub trait ListPackagesUseCase: Send + Sync {
    async fn execute(&self) -> Vec<CreditPackage>;
}
