/// Trait des entités exposées par le backend REST
///
/// Fournit l'identité d'un enregistrement et les métadonnées de la collection
/// (chemin REST, libellés d'interface).
pub trait AggregateRoot {
    // ============================================================================
    // Méthodes d'instance
    // ============================================================================

    /// Identifiant attribué par le backend (vide tant que non enregistré)
    fn id(&self) -> &str;

    /// Libellé court de l'enregistrement
    fn description(&self) -> String;

    // ============================================================================
    // Métadonnées de la collection
    // ============================================================================

    /// Index de l'entité dans l'application (par exemple "a001")
    fn aggregate_index() -> &'static str;

    /// Nom de la collection REST (par exemple "students")
    fn collection_name() -> &'static str;

    /// Nom d'un élément pour l'interface (singulier)
    fn element_name() -> &'static str;

    /// Nom de la liste pour l'interface (pluriel)
    fn list_name() -> &'static str;

    // ============================================================================
    // Méthodes par défaut
    // ============================================================================

    /// Chemin REST de la collection : "/students"
    fn collection_path() -> String {
        format!("/{}", Self::collection_name())
    }

    /// Chemin REST d'un élément : "/students/42"
    fn item_path(id: &str) -> String {
        format!("/{}/{}", Self::collection_name(), id)
    }

    /// Clé d'onglet (par exemple "a001_students")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
