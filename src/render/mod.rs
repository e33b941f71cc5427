//! Montagem do fragmento HTML final.
//!
//! O núcleo do runner devolve dados estruturados ([`RunOutcome`]); este
//! módulo é a camada delimitada que transforma esses dados em marcação.
//! Acoplar a marcação à UI viva (editor, slide) é responsabilidade do
//! host, não daqui.
//!
//! [`RunOutcome`]: crate::types::responses::RunOutcome

mod fragment;

pub use fragment::fragment;
