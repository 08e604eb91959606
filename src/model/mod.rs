pub mod asistencia;
pub mod individuo;
pub mod usuario;
