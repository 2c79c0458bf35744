//! Бенчмарки кодека заголовков wavh (см. `benches/`).
