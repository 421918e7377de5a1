use std::marker::PhantomData;

/// Offset between consecutive slots of a dynamically offset uniform buffer.
///
/// Matches the default `min_uniform_buffer_offset_alignment` limit.
pub const DYNAMIC_SLOT_STRIDE: u64 = 256;

/// Typed uniform buffer holding exactly one `Content`.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    fn name() -> &'static str {
        let type_name = std::any::type_name::<Content>();
        match type_name.rfind(':') {
            Some(pos) => &type_name[(pos + 1)..],
            None => type_name,
        }
    }

    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", Self::name())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Update buffer content, skipping the write when nothing changed
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Lays `items` out at [`DYNAMIC_SLOT_STRIDE`] byte intervals, zero padded.
pub fn pack_dynamic_slots<T: bytemuck::Pod>(items: &[T]) -> Vec<u8> {
    let stride = DYNAMIC_SLOT_STRIDE as usize;
    let mut bytes = vec![0u8; items.len() * stride];
    for (slot, item) in bytes.chunks_exact_mut(stride).zip(items) {
        let data = bytemuck::bytes_of(item);
        slot[..data.len()].copy_from_slice(data);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_dynamic_slots() {
        let bytes = pack_dynamic_slots(&[[1.0f32, 2.0], [3.0, 4.0]]);
        assert_eq!(bytes.len(), 512);

        assert_eq!(&bytes[256..264], bytemuck::bytes_of(&[3.0f32, 4.0]));
        assert!(bytes[8..256].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack_dynamic_slots::<[f32; 4]>(&[]).is_empty());
    }
}
