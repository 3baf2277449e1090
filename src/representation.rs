//! Chooses the wire shape for every (resource, operation) pair.
//!
//! The mapping is a closed, exhaustive match: adding a resource or an
//! operation without deciding its shape does not compile.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Genre,
    Actor,
    Movie,
    CinemaHall,
    MovieSession,
    Order,
    Ticket,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Genre,
        ResourceType::Actor,
        ResourceType::Movie,
        ResourceType::CinemaHall,
        ResourceType::MovieSession,
        ResourceType::Order,
        ResourceType::Ticket,
    ];

    /// Collection segment under `/api/cinema/`.
    pub fn collection(self) -> &'static str {
        match self {
            ResourceType::Genre => "genres",
            ResourceType::Actor => "actors",
            ResourceType::Movie => "movies",
            ResourceType::CinemaHall => "cinema_halls",
            ResourceType::MovieSession => "movie_sessions",
            ResourceType::Order => "orders",
            ResourceType::Ticket => "tickets",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceType::Genre => "genre",
            ResourceType::Actor => "actor",
            ResourceType::Movie => "movie",
            ResourceType::CinemaHall => "cinema hall",
            ResourceType::MovieSession => "movie session",
            ResourceType::Order => "order",
            ResourceType::Ticket => "ticket",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Retrieve,
    Write,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::List, Operation::Retrieve, Operation::Write];
}

/// Movie representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovieShape {
    /// Genres and actors flattened to display names.
    Compact,
    /// Genres and actors as nested objects.
    Expanded,
    /// Genres and actors as identifier lists.
    Writable,
}

impl MovieShape {
    pub const fn select(operation: Operation) -> Self {
        match operation {
            Operation::List => MovieShape::Compact,
            Operation::Retrieve => MovieShape::Expanded,
            Operation::Write => MovieShape::Writable,
        }
    }
}

/// Movie session representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovieSessionShape {
    /// Movie title and hall name/capacity as scalar columns, for grids.
    Flat,
    /// Embedded compact movie and full cinema hall.
    Nested,
    /// Raw movie and cinema hall identifiers.
    Writable,
}

impl MovieSessionShape {
    pub const fn select(operation: Operation) -> Self {
        match operation {
            Operation::List => MovieSessionShape::Flat,
            Operation::Retrieve => MovieSessionShape::Nested,
            Operation::Write => MovieSessionShape::Writable,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Genre,
    Actor,
    Movie(MovieShape),
    CinemaHall,
    MovieSession(MovieSessionShape),
    Order,
    Ticket,
}

pub const fn select_shape(resource: ResourceType, operation: Operation) -> Shape {
    match resource {
        ResourceType::Genre => Shape::Genre,
        ResourceType::Actor => Shape::Actor,
        ResourceType::Movie => Shape::Movie(MovieShape::select(operation)),
        ResourceType::CinemaHall => Shape::CinemaHall,
        ResourceType::MovieSession => Shape::MovieSession(MovieSessionShape::select(operation)),
        ResourceType::Order => Shape::Order,
        ResourceType::Ticket => Shape::Ticket,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// String, number or timestamp.
    Scalar,
    /// Ordered list of display strings taken from related records.
    Names,
    Nested(Shape),
    NestedMany(Shape),
    /// Identifier of a single related record.
    Reference,
    References,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field { name, kind }
}

const GENRE: &[Field] = &[field("id", FieldKind::Scalar), field("name", FieldKind::Scalar)];

const ACTOR: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("first_name", FieldKind::Scalar),
    field("last_name", FieldKind::Scalar),
    field("full_name", FieldKind::Scalar),
];

const MOVIE_COMPACT: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("title", FieldKind::Scalar),
    field("description", FieldKind::Scalar),
    field("duration", FieldKind::Scalar),
    field("genres", FieldKind::Names),
    field("actors", FieldKind::Names),
];

const MOVIE_EXPANDED: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("title", FieldKind::Scalar),
    field("description", FieldKind::Scalar),
    field("duration", FieldKind::Scalar),
    field("genres", FieldKind::NestedMany(Shape::Genre)),
    field("actors", FieldKind::NestedMany(Shape::Actor)),
];

const MOVIE_WRITABLE: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("title", FieldKind::Scalar),
    field("description", FieldKind::Scalar),
    field("duration", FieldKind::Scalar),
    field("genres", FieldKind::References),
    field("actors", FieldKind::References),
];

const CINEMA_HALL: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("name", FieldKind::Scalar),
    field("rows", FieldKind::Scalar),
    field("seats_in_row", FieldKind::Scalar),
    field("capacity", FieldKind::Scalar),
];

const MOVIE_SESSION_FLAT: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("show_time", FieldKind::Scalar),
    field("movie_title", FieldKind::Scalar),
    field("cinema_hall_name", FieldKind::Scalar),
    field("cinema_hall_capacity", FieldKind::Scalar),
];

const MOVIE_SESSION_NESTED: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("show_time", FieldKind::Scalar),
    field("movie", FieldKind::Nested(Shape::Movie(MovieShape::Compact))),
    field("cinema_hall", FieldKind::Nested(Shape::CinemaHall)),
];

const MOVIE_SESSION_WRITABLE: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("show_time", FieldKind::Scalar),
    field("movie", FieldKind::Reference),
    field("cinema_hall", FieldKind::Reference),
];

const ORDER: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("created_at", FieldKind::Scalar),
    field("user", FieldKind::Reference),
];

const TICKET: &[Field] = &[
    field("id", FieldKind::Scalar),
    field("movie_session", FieldKind::Reference),
    field("order", FieldKind::Reference),
    field("row", FieldKind::Scalar),
    field("seat", FieldKind::Scalar),
];

impl Shape {
    /// Output fields in wire order.
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Shape::Genre => GENRE,
            Shape::Actor => ACTOR,
            Shape::Movie(MovieShape::Compact) => MOVIE_COMPACT,
            Shape::Movie(MovieShape::Expanded) => MOVIE_EXPANDED,
            Shape::Movie(MovieShape::Writable) => MOVIE_WRITABLE,
            Shape::CinemaHall => CINEMA_HALL,
            Shape::MovieSession(MovieSessionShape::Flat) => MOVIE_SESSION_FLAT,
            Shape::MovieSession(MovieSessionShape::Nested) => MOVIE_SESSION_NESTED,
            Shape::MovieSession(MovieSessionShape::Writable) => MOVIE_SESSION_WRITABLE,
            Shape::Order => ORDER,
            Shape::Ticket => TICKET,
        }
    }

    pub fn field_names(self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.name).collect()
    }
}
