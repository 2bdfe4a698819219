use async_trait::async_trait;

use crate::modules::principal::application::ports::incoming::use_cases::set_preferred_language::{
    SetPreferredLanguageError, SetPreferredLanguageUseCase, ALLOWED_LANGUAGES,
};
use crate::modules::principal::application::ports::outgoing::identity_verifier::VerifiedIdentity;
use crate::modules::principal::application::ports::outgoing::principal_repository::{
    PrincipalRepository, PrincipalRepositoryError,
};
use crate::modules::principal::application::services::resolve_principal::resolve_principal;

pub struct SetPreferredLanguageService<R: PrincipalRepository> {
    principal_repository: R,
}

impl<R: PrincipalRepository> SetPreferredLanguageService<R> {
    pub fn new(principal_repository: R) -> Self {
        Self {
            principal_repository,
        }
    }
}

#[async_trait]
impl<R: PrincipalRepository> SetPreferredLanguageUseCase for SetPreferredLanguageService<R> {
    async fn execute(
        &self,
        identity: VerifiedIdentity,
        language: String,
    ) -> Result<(), SetPreferredLanguageError> {
        if !ALLOWED_LANGUAGES.contains(&language.as_str()) {
            return Err(SetPreferredLanguageError::UnsupportedLanguage(language));
        }

        let principal = resolve_principal(&self.principal_repository, &identity)
            .await
            .map_err(|e| SetPreferredLanguageError::RepositoryError(e.to_string()))?;

        self.principal_repository
            .set_preferred_language(principal.id, &language)
            .await
            .map_err(|e| SetPreferredLanguageError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::modules::principal::application::domain::entities::Principal;

    struct MockPrincipalRepo;

    #[async_trait]
    impl PrincipalRepository for MockPrincipalRepo {
        async fn get_or_create_by_subject(
            &self,
            external_subject: &str,
            _email: Option<&str>,
        ) -> Result<Principal, PrincipalRepositoryError> {
            Ok(Principal {
                id: Uuid::new_v4(),
                external_subject: external_subject.to_string(),
                email: None,
                credits: 3,
                push_token: None,
                preferred_language: "pt".to_string(),
                payment_customer_handle: None,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            })
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Principal, PrincipalRepositoryError> {
            unimplemented!()
        }

        async fn set_push_token(
            &self,
            _id: Uuid,
            _token: &str,
        ) -> Result<(), PrincipalRepositoryError> {
            unimplemented!()
        }

        async fn set_preferred_language(
            &self,
            _id: Uuid,
            _language: &str,
        ) -> Result<(), PrincipalRepositoryError> {
            Ok(())
        }

        async fn set_payment_customer_handle(
            &self,
            _id: Uuid,
            _handle: &str,
        ) -> Result<(), PrincipalRepositoryError> {
            unimplemented!()
        }
    }

    fn identity() -> VerifiedIdentity {
        VerifiedIdentity {
            subject: "subject-1".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn accepts_pt_and_en() {
        let service = SetPreferredLanguageService::new(MockPrincipalRepo);

        assert!(service
            .execute(identity(), "pt".to_string())
            .await
            .is_ok());
        assert!(service
            .execute(identity(), "en".to_string())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn rejects_unsupported_language() {
        let service = SetPreferredLanguageService::new(MockPrincipalRepo);

        let result = service.execute(identity(), "es".to_string()).await;
        assert!(matches!(
            result,
            Err(SetPreferredLanguageError::UnsupportedLanguage(_))
        ));
    }
}
