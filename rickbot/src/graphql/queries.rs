//! Fixed query documents, one per entity type. Each requests page 1 and takes a
//! `$filter` variable whose `name` narrows the results.

use crate::entity::EntityType;

pub const CHARACTERS: &str = r#"
query($filter: FilterCharacter) {
  characters(page: 1, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      status
      species
      type
      gender
      image
      origin { name }
      location { name }
    }
  }
}
"#;

pub const EPISODES: &str = r#"
query($filter: FilterEpisode) {
  episodes(page: 1, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      air_date
      episode
      characters { id name }
    }
  }
}
"#;

pub const LOCATIONS: &str = r#"
query($filter: FilterLocation) {
  locations(page: 1, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      type
      dimension
      residents { id name }
    }
  }
}
"#;

/// Query document that fetches `entity_type`.
pub fn query_document(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Characters => CHARACTERS,
        EntityType::Episodes => EPISODES,
        EntityType::Locations => LOCATIONS,
    }
}
