mod album;
mod artist;
mod forms;
mod genre;
mod query;
mod track;
mod user;

pub use album::{Album, AlbumId, AlbumSummary, AlbumWithDetails, CreateAlbum};
pub use artist::{Artist, ArtistId, CreateArtist};
pub use forms::{FieldError, RegisterArtistForm, UploadAlbumForm, UploadTrackForm};
pub use genre::{CreateGenre, Genre, GenreId};
pub use query::{AlbumFilter, AlbumQuery, SortBy, SortOrder, Timeframe};
pub use track::{CreateTrack, Track, TrackId};
pub use user::{CreateUser, Role, User, UserId};
