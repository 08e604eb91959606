use crate::api::asistencia::MarkAsistencia;
use crate::api::individuos::CreateIndividuo;
use crate::api::usuarios::RegisterUsuario;
use crate::model::asistencia::Asistencia;
use crate::model::individuo::Individuo;
use crate::model::usuario::ActiveUsuario;
use crate::store::individuos::IndividuoPatch;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asistencia API",
        version = "1.0.0",
        description = r#"
## Student Attendance Service

Registers individuals and users, and tracks daily attendance states.

### 🔹 Key Features
- **Individual Registry**
  - Create, update, delete, list and filter individual records
- **User Registration**
  - Register usuarios with unique email and DNI
- **Attendance Ledger**
  - One status per usuario per day (Presente / Ausente / Tarde / Justificado)

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::individuos::create_individuo,
        crate::api::individuos::list_individuos,
        crate::api::individuos::get_individuo,
        crate::api::individuos::get_individuo_by_dni,
        crate::api::individuos::update_individuo,
        crate::api::individuos::delete_individuo,

        crate::api::usuarios::register_usuario,

        crate::api::asistencia::active_usuarios,
        crate::api::asistencia::mark_asistencia,
        crate::api::asistencia::asistencia_for_usuario
    ),
    components(
        schemas(
            Individuo,
            CreateIndividuo,
            IndividuoPatch,
            RegisterUsuario,
            Asistencia,
            MarkAsistencia,
            ActiveUsuario
        )
    ),
    tags(
        (name = "Individuos", description = "Individual registry APIs"),
        (name = "Usuarios", description = "User registration APIs"),
        (name = "Asistencia", description = "Attendance APIs"),
    )
)]
pub struct ApiDoc;
