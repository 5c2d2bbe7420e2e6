//! Identité de l'établissement reprise sur tous les documents.

pub const SCHOOL_SHORT_NAME: &str = "IPMBTPE";

pub const SCHOOL_NAME: &str =
    "Institut Polytechnique des Métiers du Bâtiment, des Travaux Publics et de l'Entrepreneuriat";

pub const SCHOOL_DECREE: &str =
    "ARRÊTÉ N° ORDERN 25-01077 / MINESUP / SG / DDES / SDESUP / SDA / AOS du 26 Mars 2025";

pub const SCHOOL_CONTACT: &str = "BP : 16398 Mfou / Tél : (+237) 696 79 58 05 - 672 83 80 94 · \
     Site web : www.ipmbtpe.cm · E-mail : ipmbtpe@gmail.com";

pub const SCHOOL_SLOGAN: &str = "Votre carrière commence ici";

/// Logo servi par le frontend (dossier `public/assets`)
pub const HEADER_IMAGE: &str = "/assets/ipmbtpe-header.png";

/// Remplace une valeur absente sur un document signé
pub const PLACEHOLDER: &str = "……";
