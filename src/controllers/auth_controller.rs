use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{LoginResponse, UserResponse};
use crate::models::user::{LoginRequest, RegisterUserRequest, User};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Email o contraseña incorrectos";

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: UserRepository::new(state.pool.clone()),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        if self.repository.email_exists(&email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = User::new(request.full_name.trim().to_string(), email, password_hash);
        let user = self.repository.create(&user).await?;

        info!("👤 Usuario registrado: {}", user.email);
        Ok(UserResponse::from(user))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("🔒 Login fallido para {}", email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            warn!("🔒 Login fallido para {}", email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(user.id, &user.email, &self.jwt)?;

        info!("🔑 Login correcto: {}", user.email);
        Ok(LoginResponse::success(token, self.jwt.expiration, UserResponse::from(user)))
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
