//! User-facing failure messages
//!
//! Every container failure is reported as `"<prefix>: <cause>"`.

use siga_core::{EntityKind, SigaError};

/// Container operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
    Fetch,
}

pub fn prefix(kind: EntityKind, op: Operation) -> &'static str {
    match (kind, op) {
        (EntityKind::Member, Operation::Load) => "Error al cargar miembros",
        (EntityKind::Member, Operation::Create) => "Error al crear miembro",
        (EntityKind::Member, Operation::Update) => "Error al actualizar miembro",
        (EntityKind::Member, Operation::Delete) => "Error al eliminar miembro",
        (EntityKind::Member, Operation::Fetch) => "Error al cargar miembro",

        (EntityKind::Event, Operation::Load) => "Error al cargar eventos",
        (EntityKind::Event, Operation::Create) => "Error al crear evento",
        (EntityKind::Event, Operation::Update) => "Error al actualizar evento",
        (EntityKind::Event, Operation::Delete) => "Error al eliminar evento",
        (EntityKind::Event, Operation::Fetch) => "Error al cargar evento",

        (EntityKind::Transaction, Operation::Load) => "Error al cargar movimientos",
        (EntityKind::Transaction, Operation::Create) => "Error al registrar movimiento",
        (EntityKind::Transaction, Operation::Update) => "Error al actualizar movimiento",
        (EntityKind::Transaction, Operation::Delete) => "Error al eliminar movimiento",
        (EntityKind::Transaction, Operation::Fetch) => "Error al cargar movimiento",
    }
}

pub fn describe(kind: EntityKind, op: Operation, err: &SigaError) -> String {
    format!("{}: {}", prefix(kind, op), err)
}

pub const LOGIN_REJECTED: &str = "Credenciales inválidas o usuario no encontrado";
pub const LOGIN_FAILED: &str = "Error de autenticación";
pub const REGISTER_REJECTED: &str = "No se pudo crear la cuenta con los datos proporcionados";
pub const REGISTER_FAILED: &str = "Error al crear la cuenta";
pub const SESSION_UNAVAILABLE: &str = "No se pudo obtener la sesión";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_prefix_and_cause() {
        let err = SigaError::storage("disk full");
        assert_eq!(
            describe(EntityKind::Member, Operation::Load, &err),
            "Error al cargar miembros: Storage error: disk full"
        );
        assert_eq!(
            prefix(EntityKind::Event, Operation::Create),
            "Error al crear evento"
        );
    }
}
