// Une sous-commande par fichier

pub mod corpus;
pub mod evolve;
pub mod tune;
