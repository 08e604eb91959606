pub mod asistencia;
pub mod individuos;
pub mod usuarios;
