use crate::model::SampleUserDto;
use pocket_framework::{AppApi, Repository};

/// Repository over the `User` collection. The model is the DTO itself.
pub type SampleRepository = Repository<AppApi<SampleUserDto>, SampleUserDto, SampleUserDto>;
